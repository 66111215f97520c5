mod foundation_threading;
